use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct CustomerDoc { pub id: i32, pub name: String, pub email: String }

#[derive(ToSchema)]
pub struct CustomerInputDoc { pub name: String, pub email: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

/// `error` is present on 500s only.
#[derive(ToSchema)]
pub struct ErrorDoc { pub message: String, pub error: Option<String> }

#[derive(ToSchema)]
pub struct ServiceInfoDoc { pub message: String, pub status: String, pub timestamp: String, pub port: u16 }

#[derive(ToSchema)]
pub struct AppDoc { pub port: u16, pub env: String }

#[derive(ToSchema)]
pub struct DatabaseDoc {
    pub connected: bool,
    pub time: Option<String>,
    pub version: Option<String>,
    pub error: Option<String>,
}

#[derive(ToSchema)]
pub struct HealthDoc {
    /// `healthy` or `degraded`
    pub status: String,
    pub timestamp: String,
    pub app: AppDoc,
    pub database: DatabaseDoc,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Customer Engagement Portal API"),
    paths(
        crate::routes::health::root,
        crate::routes::health::health,
        crate::routes::customers::list,
        crate::routes::customers::create,
        crate::routes::customers::update,
        crate::routes::customers::delete,
    ),
    components(
        schemas(
            CustomerDoc,
            CustomerInputDoc,
            MessageDoc,
            ErrorDoc,
            ServiceInfoDoc,
            AppDoc,
            DatabaseDoc,
            HealthDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers"),
    )
)]
pub struct ApiDoc;
