pub mod alert_modal;
pub mod location_header;
pub mod map_view;
pub mod search_bar;
pub mod weather_body;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use alert_modal::{AlertModal, AlertModalProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use map_view::{MapView, MapViewProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};
