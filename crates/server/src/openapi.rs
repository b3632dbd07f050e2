use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Dates are ISO-8601 local date-times, e.g. `2024-01-01T00:00:00`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CommonsDoc {
    pub id: i64,
    pub name: String,
    pub cow_price: f64,
    pub milk_price: f64,
    pub starting_balance: f64,
    pub starting_date: String,
    pub ending_date: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateCommonsDoc {
    pub name: String,
    pub cow_price: f64,
    pub milk_price: f64,
    pub starting_balance: f64,
    pub starting_date: String,
    pub ending_date: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EditCommonsDoc {
    pub name: String,
    pub cow_price: f64,
    pub milk_price: f64,
    pub starting_balance: f64,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserCommonsDoc {
    pub id: i64,
    pub commons_id: i64,
    pub user_id: i64,
    pub cow_health: i32,
    pub cow_price: f64,
    pub num_cows: i32,
    pub total_wealth: f64,
}

#[derive(ToSchema)]
pub struct CurrentUserDoc { pub id: i64, pub email: String, pub roles: Vec<String> }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::current_user,
        crate::routes::commons::list_all,
        crate::routes::commons::get_by_id,
        crate::routes::commons::create,
        crate::routes::commons::join,
        crate::routes::commons::remove_user,
        crate::routes::commons::list_members,
        crate::routes::commons::delete_commons,
        crate::routes::commons::edit,
    ),
    components(
        schemas(
            HealthResponse,
            CommonsDoc,
            CreateCommonsDoc,
            EditCommonsDoc,
            UserCommonsDoc,
            CurrentUserDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "commons")
    )
)]
pub struct ApiDoc;
