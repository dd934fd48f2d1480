use std::sync::Arc;

use crate::services::places_client::provider::PlacesProvider;

/// Lifecycle of the provider SDK for the whole session. Set once to a
/// terminal value; never reverts to Loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReadiness {
    Loading,
    Ready,
    ConfigMissing,
    LoadFailed,
}

pub enum BootstrapStep {
    /// Already settled (or a load is in flight); nothing to do.
    Settled(ProviderReadiness),
    /// No credential is configured. Readiness is already ConfigMissing and
    /// no network request was made.
    MissingCredential,
    /// The caller must request the SDK from this provider and report back
    /// through `complete`.
    Load(Arc<dyn PlacesProvider>),
}

pub struct ProviderBootstrap {
    provider: Option<Arc<dyn PlacesProvider>>,
    readiness: ProviderReadiness,
    started: bool,
}

impl ProviderBootstrap {
    pub fn new(provider: Option<Arc<dyn PlacesProvider>>) -> Self {
        Self {
            provider,
            readiness: ProviderReadiness::Loading,
            started: false,
        }
    }

    pub fn readiness(&self) -> ProviderReadiness {
        self.readiness.clone()
    }

    /// Decides what the caller must do to finish bootstrapping. The SDK is
    /// requested at most once: every call after the first settles
    /// immediately with the current readiness.
    pub fn begin(&mut self) -> BootstrapStep {
        if self.started {
            return BootstrapStep::Settled(self.readiness.clone());
        }
        self.started = true;

        match self.provider.clone() {
            None => {
                self.readiness = ProviderReadiness::ConfigMissing;
                BootstrapStep::MissingCredential
            }
            Some(provider) => BootstrapStep::Load(provider),
        }
    }

    pub fn complete(&mut self, loaded: bool) -> ProviderReadiness {
        self.readiness = if loaded {
            ProviderReadiness::Ready
        } else {
            ProviderReadiness::LoadFailed
        };
        self.readiness.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_support::FakeProvider;

    #[test]
    fn starts_loading() {
        let bootstrap = ProviderBootstrap::new(None);

        assert_eq!(bootstrap.readiness(), ProviderReadiness::Loading);
    }

    #[test]
    fn missing_credential_settles_synchronously() {
        let mut bootstrap = ProviderBootstrap::new(None);

        assert!(matches!(bootstrap.begin(), BootstrapStep::MissingCredential));
        assert_eq!(bootstrap.readiness(), ProviderReadiness::ConfigMissing);

        match bootstrap.begin() {
            BootstrapStep::Settled(readiness) => {
                assert_eq!(readiness, ProviderReadiness::ConfigMissing);
            }
            _ => panic!("expected a settled step"),
        }
    }

    #[test]
    fn load_is_requested_once() {
        let mut bootstrap = ProviderBootstrap::new(Some(Arc::new(FakeProvider::new())));

        assert!(matches!(bootstrap.begin(), BootstrapStep::Load(_)));

        // second call while the load is still in flight
        match bootstrap.begin() {
            BootstrapStep::Settled(readiness) => {
                assert_eq!(readiness, ProviderReadiness::Loading);
            }
            _ => panic!("expected a settled step"),
        }
    }

    #[test]
    fn complete_reaches_a_terminal_state() {
        let mut bootstrap = ProviderBootstrap::new(Some(Arc::new(FakeProvider::new())));
        bootstrap.begin();

        assert_eq!(bootstrap.complete(true), ProviderReadiness::Ready);
        assert_eq!(bootstrap.readiness(), ProviderReadiness::Ready);

        match bootstrap.begin() {
            BootstrapStep::Settled(readiness) => assert_eq!(readiness, ProviderReadiness::Ready),
            _ => panic!("expected a settled step"),
        }
    }

    #[test]
    fn failed_load_is_terminal() {
        let mut bootstrap = ProviderBootstrap::new(Some(Arc::new(FakeProvider::new())));
        bootstrap.begin();

        assert_eq!(bootstrap.complete(false), ProviderReadiness::LoadFailed);

        match bootstrap.begin() {
            BootstrapStep::Settled(readiness) => {
                assert_eq!(readiness, ProviderReadiness::LoadFailed);
            }
            _ => panic!("expected a settled step"),
        }
    }
}
