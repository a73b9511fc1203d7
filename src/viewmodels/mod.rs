pub mod map_viewmodel;

pub use map_viewmodel::MapViewModel;
