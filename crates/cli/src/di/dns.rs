use anyhow::{anyhow, Context};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use zonegate_application::ports::{CacheMaintenancePort, RecordStore, ResponseCachePort};
use zonegate_application::use_cases::QueryDispatcher;
use zonegate_domain::config::UpstreamAddr;
use zonegate_domain::Config;
use zonegate_infrastructure::dns::{
    ClientAccessGate, InMemoryRecordStore, ResponseCache, ResponseCacheMaintenance,
    UdpUpstreamResolver,
};

pub struct DnsServices {
    pub dispatcher: Arc<QueryDispatcher>,
    pub cache: Option<Arc<ResponseCache>>,
    pub cache_maintenance: Option<Arc<dyn CacheMaintenancePort>>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let record_store = Arc::new(Self::build_record_store(config)?);
        let access_gate = Arc::new(Self::build_access_gate(config)?);
        let upstream_addr = Self::resolve_upstream(config).await?;
        let upstream = Arc::new(UdpUpstreamResolver::new(upstream_addr));

        let cache = config.cache.enabled.then(|| Arc::new(ResponseCache::new()));
        let cache_maintenance = cache.as_ref().map(|cache| {
            Arc::new(ResponseCacheMaintenance::new(cache.clone())) as Arc<dyn CacheMaintenancePort>
        });

        let dispatcher = QueryDispatcher::new(
            record_store,
            cache
                .clone()
                .map(|cache| cache as Arc<dyn ResponseCachePort>),
            access_gate,
            upstream,
        )
        .with_upstream_timeout(Duration::from_secs(config.upstream.timeout_secs))
        .with_default_ttl(config.zone.default_ttl);

        info!(
            upstream = %upstream_addr,
            cache_enabled = config.cache.enabled,
            timeout_secs = config.upstream.timeout_secs,
            "DNS services initialized"
        );

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            cache,
            cache_maintenance,
        })
    }

    fn build_record_store(config: &Config) -> anyhow::Result<InMemoryRecordStore> {
        let Some(path) = config.zone.file.as_deref() else {
            warn!("No zone file configured, serving an empty local zone");
            return Ok(InMemoryRecordStore::empty());
        };

        let store = InMemoryRecordStore::from_json_file(path)
            .with_context(|| format!("Failed to load zone file {}", path))?;
        info!(path, domains = store.len(), "Local zone loaded");
        Ok(store)
    }

    fn build_access_gate(config: &Config) -> anyhow::Result<ClientAccessGate> {
        let networks = config.access.allowed_networks().map_err(|e| anyhow!(e))?;
        if networks.is_empty() {
            warn!("Allow-list is empty, every client will be refused");
        }

        info!(
            allowed = networks.len(),
            rate_limit = config.access.rate_limit,
            window_secs = config.access.window_secs,
            "Access gate configured"
        );

        Ok(ClientAccessGate::new(networks).with_rate_limit(
            config.access.rate_limit,
            Duration::from_secs(config.access.window_secs),
        ))
    }

    async fn resolve_upstream(config: &Config) -> anyhow::Result<SocketAddr> {
        let addr = config.upstream.upstream_addr()?;
        match addr {
            UpstreamAddr::Resolved(socket_addr) => Ok(socket_addr),
            UpstreamAddr::Unresolved { hostname, port } => {
                let resolved = tokio::net::lookup_host((hostname.as_ref(), port))
                    .await
                    .with_context(|| format!("Failed to resolve upstream {}", hostname))?
                    .next()
                    .ok_or_else(|| anyhow!("Upstream {} resolved to no address", hostname))?;
                info!(hostname = %hostname, resolved = %resolved, "Upstream hostname resolved");
                Ok(resolved)
            }
        }
    }
}
