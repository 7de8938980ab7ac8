//! Logging de peticiones HTTP
//! 
//! Una línea por petición con método, ruta, estado y duración. El nivel
//! depende del estado: error para 5xx, warn para 4xx, info para el resto.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = started.elapsed().as_millis();
    if status.is_server_error() {
        error!("{} {} -> {} ({} ms)", method, path, status.as_u16(), elapsed);
    } else if status.is_client_error() {
        warn!("{} {} -> {} ({} ms)", method, path, status.as_u16(), elapsed);
    } else {
        info!("{} {} -> {} ({} ms)", method, path, status.as_u16(), elapsed);
    }

    response
}
