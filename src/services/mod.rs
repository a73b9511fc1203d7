pub mod api_client;
pub mod geolocation;
pub mod transport;

pub use api_client::{ApiClient, ApiResponse};
pub use geolocation::{BrowserGeolocation, LocationProvider};
pub use transport::{FetchTransport, HttpMethod, HttpTransport};
