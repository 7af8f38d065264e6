//! Writes that keep the cache consistent.
//!
//! A [`Mutation`] runs one write. On success it invalidates the key
//! prefixes it was configured with and reports the localized success
//! message. On failure it reports the server's message, or the generic one,
//! and leaves the cache alone.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use metrics::counter;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::context::AppContext;
use crate::cache::KeyPrefix;
use crate::infra::transport::ApiError;

type Run<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<O, ApiError>> + Send + Sync>;
type Targets<I> = Arc<dyn Fn(&I) -> Vec<KeyPrefix> + Send + Sync>;

/// `(namespace, key)` of a catalog message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageKey {
    pub namespace: &'static str,
    pub key: &'static str,
}

impl MessageKey {
    pub const fn new(namespace: &'static str, key: &'static str) -> Self {
        Self { namespace, key }
    }
}

const GENERIC_SUCCESS: MessageKey = MessageKey::new("common", "success");
const GENERIC_ERROR: MessageKey = MessageKey::new("common", "error_generic");

pub struct Mutation<I, O> {
    name: &'static str,
    ctx: AppContext,
    run: Run<I, O>,
    targets: Targets<I>,
    success: MessageKey,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            ctx: self.ctx.clone(),
            run: self.run.clone(),
            targets: self.targets.clone(),
            success: self.success,
        }
    }
}

impl<I, O> std::fmt::Debug for Mutation<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation")
            .field("name", &self.name)
            .field("success", &self.success)
            .finish_non_exhaustive()
    }
}

impl<I, O> Mutation<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new<F, Fut>(ctx: &AppContext, name: &'static str, run: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, ApiError>> + Send + 'static,
    {
        Self {
            name,
            ctx: ctx.clone(),
            run: Arc::new(move |input| run(input).boxed()),
            targets: Arc::new(|_| Vec::new()),
            success: GENERIC_SUCCESS,
        }
    }

    /// Prefixes invalidated after every successful run.
    #[must_use]
    pub fn invalidates(self, prefixes: impl IntoIterator<Item = KeyPrefix>) -> Self {
        let prefixes: Vec<KeyPrefix> = prefixes.into_iter().collect();
        self.invalidates_with(move |_| prefixes.clone())
    }

    /// Prefixes derived from the input, e.g. the detail key of the record
    /// being updated. Computed before the write runs.
    #[must_use]
    pub fn invalidates_with<F>(mut self, targets: F) -> Self
    where
        F: Fn(&I) -> Vec<KeyPrefix> + Send + Sync + 'static,
    {
        let previous = self.targets;
        self.targets = Arc::new(move |input| {
            let mut prefixes = previous(input);
            prefixes.extend(targets(input));
            prefixes
        });
        self
    }

    #[must_use]
    pub fn success_message(mut self, namespace: &'static str, key: &'static str) -> Self {
        self.success = MessageKey::new(namespace, key);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn mutate(&self, input: I) -> Result<O, ApiError> {
        let mutation_id = Uuid::new_v4();
        let prefixes = (self.targets)(&input);

        match (self.run)(input).await {
            Ok(output) => {
                let invalidated = self.ctx.cache().invalidate_many(&prefixes);
                counter!("rentbook_mutation_total", "mutation" => self.name, "outcome" => "success")
                    .increment(1);
                info!(
                    mutation = self.name,
                    %mutation_id,
                    prefixes = prefixes.len(),
                    invalidated,
                    "mutation succeeded"
                );
                let message = self
                    .ctx
                    .localizer()
                    .translate(self.success.namespace, self.success.key);
                self.ctx.notifier().success(&message);
                Ok(output)
            }
            Err(error) => {
                counter!("rentbook_mutation_total", "mutation" => self.name, "outcome" => "error")
                    .increment(1);
                warn!(mutation = self.name, %mutation_id, error = %error, "mutation failed");
                let message = error.message().map_or_else(
                    || {
                        self.ctx
                            .localizer()
                            .translate(GENERIC_ERROR.namespace, GENERIC_ERROR.key)
                    },
                    str::to_string,
                );
                self.ctx.notifier().error(&message);
                Err(error)
            }
        }
    }
}
