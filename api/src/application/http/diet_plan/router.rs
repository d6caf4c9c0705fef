use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    generate_plan::{__path_generate_plan, generate_plan},
    get_plan::{__path_get_plan, get_plan},
    get_plan_calendar::{__path_get_plan_calendar, get_plan_calendar},
    get_plan_history::{__path_get_plan_history, get_plan_history},
    get_todays_plan::{__path_get_todays_plan, get_todays_plan},
    substitute_meals::{__path_substitute_meals, substitute_meals},
};
use crate::application::{
    http::server::app_state::AppState, user_middleware::user_middleware,
};

#[derive(OpenApi)]
#[openapi(paths(
    get_plan_history,
    generate_plan,
    get_todays_plan,
    get_plan_calendar,
    get_plan,
    substitute_meals
))]
pub struct DietPlanApiDoc;

pub fn diet_plan_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(
            &format!("{root_path}/diet-plans"),
            get(get_plan_history).post(generate_plan),
        )
        .route(&format!("{root_path}/diet-plans/today"), get(get_todays_plan))
        .route(
            &format!("{root_path}/diet-plans/calendar"),
            get(get_plan_calendar),
        )
        .route(&format!("{root_path}/diet-plans/{{date}}"), get(get_plan))
        .route(
            &format!("{root_path}/diet-plans/{{date}}/substitutions"),
            post(substitute_meals),
        )
        .route_layer(middleware::from_fn(user_middleware))
}
