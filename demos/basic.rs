use {
    ::axum::{
        BoxError, Router,
        error_handling::*,
        http::*,
        response::{IntoResponse, Response},
        routing::*,
        serve,
    },
    tokio::{net::*, *},
    tower::ServiceBuilder,
    tower_http::trace::*,
    tower_http_cache_control::{axum::*, descriptors, directives::*, *},
    tracing_subscriber::{EnvFilter, fmt},
};

// Axum server with our Cache-Control middleware for Tower
//
// Look at the response headers:
//
//   curl --head http://localhost:8080
//   curl --head http://localhost:8080/private
//   curl --head http://localhost:8080/fresh

#[main]
async fn main() {
    init_tracing();

    // Descriptors can be mixed: keywords, durations, and maps
    let descriptors = descriptors![
        "public",
        DirectiveMap::default()
            .max_age("1h")
            .s_maxage("1d")
            .must_revalidate(true),
    ];

    let router = Router::default()
        .route("/", get(("Hello, world!\n",)))
        // The handler's own header wins over the middleware's
        .route("/private", get(private_handler))
        .route("/fresh", get(fresh_handler))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_error))
                .layer(CacheControlLayer::new(descriptors)),
        )
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("[::]:8080")
        .await
        .expect("TcpListener::bind");
    // If IPv6 is disabled on your machine (for shame!):
    // let listener = TcpListener::bind("0.0.0.0:8080").await.expect("bind");
    tracing::info!("bound to: {:?}", listener.local_addr());
    serve(listener, router).await.expect("axum::serve");
}

async fn private_handler() -> Response {
    let map = DirectiveMap::default().private(true).max_age(60);
    "Just for you!\n"
        .with_cache_control([map])
        .unwrap_or_else(|error| error_response(error.into()))
}

async fn fresh_handler() -> Response {
    "Always fresh!\n"
        .with_cache_control(["no-store"])
        .unwrap_or_else(|error| error_response(error.into()))
}

async fn handle_error(error: BoxError) -> Response {
    error_response(error)
}

fn error_response(error: BoxError) -> Response {
    tracing::error!("{}", error);
    (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http_cache_control=debug"));
    fmt().with_env_filter(filter).init();
}
