use axum::Router;
use std::net::SocketAddr;

pub(crate) async fn spawn_http_server(port: u16, app: Router) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::debug!("HTTP server listening on {}", addr);
    tokio::spawn(async move {
        axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
    })
    .await
    .map_err(std::io::Error::other)?
}
