pub mod device;
pub mod preference;
pub mod room;
pub mod sensor;
pub mod threshold;

pub use device::{Device, DeviceTable};
pub use preference::{Preference, PreferenceTable};
pub use room::{Room, RoomTable};
pub use sensor::{Sensor, SensorTable};
pub use threshold::{Threshold, ThresholdTable};

pub trait Table: Send + Sync {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
