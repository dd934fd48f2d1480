use std::sync::Arc;

use crate::search::session::SearchSession;
use crate::services::places_client::places_service::{PlacesService, PlacesServiceConfig};
use crate::services::places_client::provider::PlacesProvider;

/// Builds a search session against the given provider host. A missing or
/// empty credential yields a session that settles in ConfigMissing without
/// ever touching the network.
pub fn gen_session(host: &str, api_key: Option<String>) -> SearchSession {
    let provider = api_key.filter(|key| !key.is_empty()).map(|api_key| {
        Arc::new(PlacesService::new(PlacesServiceConfig {
            api_key,
            host: host.to_string(),
        })) as Arc<dyn PlacesProvider>
    });

    SearchSession::new(provider)
}

#[cfg(test)]
pub struct MockSession {
    pub session: SearchSession,
    pub google_server: mockito::ServerGuard,
}

#[cfg(test)]
pub async fn gen_mock_session() -> MockSession {
    let google_server = mockito::Server::new_async().await;
    let session = gen_session(google_server.url().as_str(), Some("key".to_string()));

    MockSession {
        session,
        google_server,
    }
}
