pub mod device_handle;
pub mod mqtt_handle;
pub mod preference_handle;
pub mod room_handle;
pub mod scene_handle;
pub mod sensor_handle;
pub mod threshold_handle;

pub use device_handle::*;
pub use mqtt_handle::*;
pub use preference_handle::*;
pub use room_handle::*;
pub use scene_handle::*;
pub use sensor_handle::*;
pub use threshold_handle::*;
