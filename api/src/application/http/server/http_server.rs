use std::sync::Arc;

use axum::{
    Router,
    http::{
        HeaderName, HeaderValue, Method,
        header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE},
    },
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info_span, warn};
use utoipa_swagger_ui::SwaggerUi;
use vitaplan_core::{application::create_service, domain::common::VitaplanConfig};

use crate::{
    application::{
        http::{
            conversation::router::conversation_routes,
            daily_status::router::daily_status_routes,
            diet_plan::router::diet_plan_routes,
            feedback::router::feedback_routes,
            health::router::health_routes,
            recommendation::router::recommendation_routes,
            server::{app_state::AppState, openapi::api_doc},
            user_profile::router::user_profile_routes,
        },
        user_middleware::USER_ID_HEADER,
    },
    args::Args,
};

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = VitaplanConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

/// Feature routes without the metrics and docs layers. Used directly by tests.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(health_routes(state.clone()))
        .merge(user_profile_routes(state.clone()))
        .merge(conversation_routes(state.clone()))
        .merge(recommendation_routes(state.clone()))
        .merge(diet_plan_routes(state.clone()))
        .merge(feedback_routes(state.clone()))
        .merge(daily_status_routes(state.clone()))
        .with_state(state)
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
        let uri: String = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let root_path = state.args.server.root_path.clone();
    let mut openapi = api_doc();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();
    openapi.paths = paths;

    let router = Router::new()
        .merge(
            SwaggerUi::new(format!("{root_path}/swagger-ui"))
                .url(format!("{root_path}/api-docs/openapi.json"), openapi),
        )
        .route(
            &format!("{root_path}/metrics"),
            get(|| async move { metric_handle.render() }),
        )
        .merge(api_routes(state))
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer);

    Ok(router)
}
