use catalog::CatalogService;
use server_api::DispatchBridge;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: CatalogService,
    pub(crate) bridge: DispatchBridge,
}
