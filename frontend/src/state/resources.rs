//! Generic fetch/cache/mutate layer, one store per backend collection.
//!
//! Reads serve the cached list while it is fresh (a five-minute window) and
//! refetch otherwise, with at most one request in flight per store. Every
//! mutation waits for the server acknowledgment, then invalidates and
//! refetches; the cache is never merged optimistically.

use leptos::*;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

use crate::{
    api::{ApiClient, ApiError, Bicycle, BicyclePayload, Employee, EmployeePayload},
    api::{RouteInfo, RoutePayload, Shift, ShiftPayload},
    utils::time,
};

pub const STALE_AFTER_MS: f64 = 5.0 * 60.0 * 1000.0;

/// Descriptor tying a backend collection to its item/payload types.
pub trait RestCollection: 'static {
    type Item: Clone + PartialEq + DeserializeOwned + 'static;
    type Payload: Clone + Serialize + 'static;
    /// Collection path under the API base, e.g. `"/Bicycles"`.
    const PATH: &'static str;
    fn id(item: &Self::Item) -> i64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T: Clone> {
    pub items: Vec<T>,
    pub fetched_at: Option<f64>,
    pub loading: bool,
    pub error: Option<ApiError>,
    in_flight: bool,
}

impl<T: Clone> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            fetched_at: None,
            loading: false,
            error: None,
            in_flight: false,
        }
    }
}

impl<T: Clone> ListState<T> {
    pub fn is_fresh(&self, now_ms: f64) -> bool {
        self.fetched_at
            .map(|at| now_ms - at < STALE_AFTER_MS)
            .unwrap_or(false)
    }
}

pub struct ResourceStore<C: RestCollection> {
    api: ApiClient,
    state: RwSignal<ListState<C::Item>>,
    _collection: PhantomData<C>,
}

impl<C: RestCollection> Clone for ResourceStore<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state,
            _collection: PhantomData,
        }
    }
}

impl<C: RestCollection> ResourceStore<C> {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_default();
        Self::new_with_client(api)
    }

    pub fn new_with_client(api: ApiClient) -> Self {
        Self {
            api,
            state: create_rw_signal(ListState::default()),
            _collection: PhantomData,
        }
    }

    pub fn state(&self) -> RwSignal<ListState<C::Item>> {
        self.state
    }

    pub fn items(&self) -> Signal<Vec<C::Item>> {
        let state = self.state;
        Signal::derive(move || state.get().items)
    }

    pub fn loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().loading)
    }

    pub fn error(&self) -> Signal<Option<ApiError>> {
        let state = self.state;
        Signal::derive(move || state.get().error.clone())
    }

    /// Serve the cache while fresh; refetch otherwise. Callers racing each
    /// other collapse onto the single in-flight request.
    pub async fn ensure_fresh(&self) {
        let now = time::now_ms();
        let satisfied = self
            .state
            .with_untracked(|s| s.in_flight || s.is_fresh(now));
        if satisfied {
            return;
        }
        self.refresh().await;
    }

    /// Unconditional refetch. A fetch failure keeps the previous items and
    /// surfaces on `error`.
    pub async fn refresh(&self) {
        if self.state.with_untracked(|s| s.in_flight) {
            return;
        }
        self.state.update(|s| {
            s.in_flight = true;
            s.loading = true;
            s.error = None;
        });
        let result = self.api.fetch_list::<C::Item>(C::PATH).await;
        self.state.update(|s| {
            s.in_flight = false;
            s.loading = false;
            match result {
                Ok(items) => {
                    s.items = items;
                    s.fetched_at = Some(time::now_ms());
                }
                Err(err) => s.error = Some(err),
            }
        });
    }

    /// Mark the cache stale so the next read refetches.
    pub fn invalidate(&self) {
        self.state.update(|s| s.fetched_at = None);
    }

    pub async fn create(&self, payload: C::Payload) -> Result<(), ApiError> {
        self.api.create_item(C::PATH, &payload).await?;
        // Only after the server acknowledged the write.
        self.invalidate();
        self.refresh().await;
        Ok(())
    }

    pub async fn update(&self, id: i64, payload: C::Payload) -> Result<(), ApiError> {
        self.api.update_item(C::PATH, id, &payload).await?;
        self.invalidate();
        self.refresh().await;
        Ok(())
    }

    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_item(C::PATH, id).await?;
        self.invalidate();
        self.refresh().await;
        Ok(())
    }
}

// Collection descriptors for the four backend resources.

pub struct Employees;

impl RestCollection for Employees {
    type Item = Employee;
    type Payload = EmployeePayload;
    const PATH: &'static str = "/Employees";
    fn id(item: &Employee) -> i64 {
        item.employee_id
    }
}

pub struct Bicycles;

impl RestCollection for Bicycles {
    type Item = Bicycle;
    type Payload = BicyclePayload;
    const PATH: &'static str = "/Bicycles";
    fn id(item: &Bicycle) -> i64 {
        item.bicycle_id
    }
}

pub struct Routes;

impl RestCollection for Routes {
    type Item = RouteInfo;
    type Payload = RoutePayload;
    const PATH: &'static str = "/Routes";
    fn id(item: &RouteInfo) -> i64 {
        item.id
    }
}

pub struct Shifts;

impl RestCollection for Shifts {
    type Item = Shift;
    type Payload = ShiftPayload;
    const PATH: &'static str = "/Shift";
    fn id(item: &Shift) -> i64 {
        item.shift_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_window_is_five_minutes() {
        let mut state: ListState<Bicycle> = ListState::default();
        assert!(!state.is_fresh(0.0));

        state.fetched_at = Some(1_000.0);
        assert!(state.is_fresh(1_000.0 + STALE_AFTER_MS - 1.0));
        assert!(!state.is_fresh(1_000.0 + STALE_AFTER_MS));
    }

    #[test]
    fn collection_ids_read_the_right_field() {
        let bicycle = Bicycle {
            bicycle_id: 3,
            bicycle_number: 18,
            in_operate: true,
        };
        assert_eq!(Bicycles::id(&bicycle), 3);

        let route = RouteInfo {
            id: 5,
            route_number: 12,
        };
        assert_eq!(Routes::id(&route), 5);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::client::TOKEN_KEY;
    use crate::utils::storage;
    use httpmock::prelude::*;

    fn bicycle_rows() -> serde_json::Value {
        serde_json::json!([
            { "bicycleId": 1, "bicycleNumber": 12, "inOperate": true }
        ])
    }

    #[tokio::test]
    async fn list_twice_within_window_hits_the_network_once() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(200).json_body(bicycle_rows());
        });

        let runtime = create_runtime();
        let store: ResourceStore<Bicycles> =
            ResourceStore::new_with_client(ApiClient::new_with_base_url(server.url("/api")));

        store.ensure_fresh().await;
        store.ensure_fresh().await;

        assert_eq!(list.hits(), 1);
        assert_eq!(store.state().get_untracked().items.len(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn concurrent_reads_collapse_onto_one_request() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(200).json_body(bicycle_rows());
        });

        let runtime = create_runtime();
        let store: ResourceStore<Bicycles> =
            ResourceStore::new_with_client(ApiClient::new_with_base_url(server.url("/api")));

        futures::future::join(store.ensure_fresh(), store.ensure_fresh()).await;

        assert_eq!(list.hits(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn stale_cache_is_refetched() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(200).json_body(bicycle_rows());
        });

        let runtime = create_runtime();
        let store: ResourceStore<Bicycles> =
            ResourceStore::new_with_client(ApiClient::new_with_base_url(server.url("/api")));

        store.ensure_fresh().await;
        // Age the cache past the staleness window.
        store
            .state()
            .update(|s| s.fetched_at = Some(time::now_ms() - STALE_AFTER_MS - 1.0));
        store.ensure_fresh().await;

        assert_eq!(list.hits(), 2);
        runtime.dispose();
    }

    #[tokio::test]
    async fn create_invalidates_and_refetches_after_ack() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(200).json_body(serde_json::json!([
                { "bicycleId": 1, "bicycleNumber": 12, "inOperate": true },
                { "bicycleId": 2, "bicycleNumber": 44, "inOperate": false }
            ]));
        });
        let created = server.mock(|when, then| {
            when.method(POST)
                .path("/api/Bicycles")
                .json_body(serde_json::json!({ "bicycleNumber": 44, "inOperate": false }));
            then.status(201)
                .json_body(serde_json::json!({ "bicycleId": 2, "bicycleNumber": 44, "inOperate": false }));
        });

        let runtime = create_runtime();
        let store: ResourceStore<Bicycles> =
            ResourceStore::new_with_client(ApiClient::new_with_base_url(server.url("/api")));

        store
            .create(BicyclePayload {
                bicycle_number: 44,
                in_operate: false,
            })
            .await
            .unwrap();

        created.assert();
        // The refetched list contains the server's canonical row.
        assert_eq!(list.hits(), 1);
        let items = store.state().get_untracked().items;
        assert!(items
            .iter()
            .any(|b| b.bicycle_number == 44 && !b.in_operate));
        runtime.dispose();
    }

    #[tokio::test]
    async fn duplicate_create_surfaces_error_and_leaves_cache_untouched() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(200).json_body(bicycle_rows());
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/Bicycles");
            then.status(409).json_body(serde_json::json!({
                "error": "Bicycle number already exists",
                "code": "DUPLICATE_BICYCLE_NUMBER"
            }));
        });

        let runtime = create_runtime();
        let store: ResourceStore<Bicycles> =
            ResourceStore::new_with_client(ApiClient::new_with_base_url(server.url("/api")));

        store.ensure_fresh().await;
        let before = store.state().get_untracked().items;

        let err = store
            .create(BicyclePayload {
                bicycle_number: 12,
                in_operate: true,
            })
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(store.state().get_untracked().items, before);
        // No refetch happened for the failed mutation.
        assert_eq!(list.hits(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn fetch_failure_keeps_previous_items() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let ok = server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(200).json_body(bicycle_rows());
        });

        let runtime = create_runtime();
        let store: ResourceStore<Bicycles> =
            ResourceStore::new_with_client(ApiClient::new_with_base_url(server.url("/api")));
        store.ensure_fresh().await;
        ok.delete_async().await;

        server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(500)
                .json_body(serde_json::json!({ "error": "boom" }));
        });
        store.refresh().await;

        let state = store.state().get_untracked();
        assert_eq!(state.items.len(), 1);
        assert!(state.error.is_some());
        runtime.dispose();
    }
}
