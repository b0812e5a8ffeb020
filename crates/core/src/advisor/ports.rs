use async_trait::async_trait;
use catalogsync_domain::Result;

/// One candidate model of the fallback chain.
///
/// `Err` means a transport or provider failure and moves the chain to the
/// next candidate. Any `Ok` text ends the chain, well-formed or not.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String>;
}
