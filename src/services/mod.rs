pub mod link_renderer;
pub mod page_store;

pub use link_renderer::LinkRenderer;
pub use page_store::PageStore;
