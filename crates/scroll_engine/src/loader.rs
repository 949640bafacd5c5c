use futures_util::future::BoxFuture;
use scroll_core::LoadEdge;

/// Caller-supplied content fetch. Errors are the loader's business: the
/// coordinator only observes that the future completed.
#[async_trait::async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, edge: LoadEdge);
}

/// Caller-supplied pull-to-refresh action.
#[async_trait::async_trait]
pub trait RefreshAction: Send + Sync {
    async fn refresh(&self);
}

/// Adapts a closure returning a boxed future into a [`Loader`].
pub struct FnLoader<F> {
    f: F,
}

impl<F> FnLoader<F>
where
    F: Fn(LoadEdge) -> BoxFuture<'static, ()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait::async_trait]
impl<F> Loader for FnLoader<F>
where
    F: Fn(LoadEdge) -> BoxFuture<'static, ()> + Send + Sync,
{
    async fn load(&self, edge: LoadEdge) {
        (self.f)(edge).await;
    }
}

/// Adapts a closure returning a boxed future into a [`RefreshAction`].
pub struct FnRefresh<F> {
    f: F,
}

impl<F> FnRefresh<F>
where
    F: Fn() -> BoxFuture<'static, ()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait::async_trait]
impl<F> RefreshAction for FnRefresh<F>
where
    F: Fn() -> BoxFuture<'static, ()> + Send + Sync,
{
    async fn refresh(&self) {
        (self.f)().await;
    }
}
