use std::net::SocketAddr;

use axum::{
    extract::{
        MatchedPath,
        Request,
    },
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::trace::{
    DefaultOnRequest,
    DefaultOnResponse,
    TraceLayer,
};

use crate::error::Error;

pub struct Server {
    router: Router,
    shutdown: CancellationToken,
}

impl Server {
    pub fn new(router: Router) -> Self {
        let router = router.layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &Request| {
                        let method = req.method();
                        let uri = req.uri();

                        // axum automatically adds this extension.
                        let matched_path = req
                            .extensions()
                            .get::<MatchedPath>()
                            .map(|matched_path| matched_path.as_str());

                        tracing::info_span!("request", %method, %uri, matched_path)
                    })
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            ),
        );

        Self {
            router,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub async fn bind(self, address: SocketAddr) -> Result<(), Error> {
        let listener = TcpListener::bind(address).await?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        tracing::info!("Listening at http://{}", listener.local_addr()?);
        let shutdown = self.shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;
        Ok(())
    }
}
