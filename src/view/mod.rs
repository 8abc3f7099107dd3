pub mod table;
pub mod verdict;

use crate::gateway::GatewayClient;
use crate::gateway::error::QueryError;
use crate::query::NetQuery;
use log::debug;

/// Idle → Loading → Success | Error
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Idle,
    Loading,
    Success(T),
    Error(QueryError),
}

/// Handed out when a request is dispatched; only the newest one may resolve.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// 单个功能页面的请求生命周期
#[derive(Debug)]
pub struct Page<T> {
    state: PageState<T>,
    generation: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            state: PageState::Idle,
            generation: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading)
    }

    /// Enters Loading. Returns `None` while a request is already in flight.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_loading() {
            return None;
        }
        self.generation += 1;
        self.state = PageState::Loading;
        Some(Ticket(self.generation))
    }

    /// Local validation failure, goes straight to Error.
    pub fn reject(&mut self, error: QueryError) {
        if !self.is_loading() {
            self.state = PageState::Error(error);
        }
    }

    /// Applies a finished request. Stale tickets are dropped and `false` is returned.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T, QueryError>) -> bool {
        if ticket.0 != self.generation || !self.is_loading() {
            debug!(
                "Discarding stale result (ticket {}, current {})",
                ticket.0, self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(output) => PageState::Success(output),
            Err(error) => PageState::Error(error),
        };
        true
    }

    /// Leaving the page: anything still in flight becomes stale.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = PageState::Idle;
    }
}

/// Validates, dispatches and resolves one query on `page`.
/// Returns `false` when nothing was sent.
pub async fn submit<Q: NetQuery>(
    page: &mut Page<Q::Output>,
    gateway: &GatewayClient,
    query: &Q,
) -> bool {
    if page.is_loading() {
        debug!("{} is already loading, ignoring submit", query.name());
        return false;
    }
    if let Err(error) = query.endpoint() {
        page.reject(error);
        return false;
    }
    let Some(ticket) = page.begin() else {
        return false;
    };
    let result = query.run(gateway).await;
    page.resolve(ticket, result);
    true
}
