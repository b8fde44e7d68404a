mod device;
mod preference;
mod room;
mod sensor;
mod threshold;

pub use device::DeviceRepository;
pub use preference::PreferenceRepository;
pub use room::RoomRepository;
pub use sensor::SensorRepository;
pub use threshold::ThresholdRepository;
