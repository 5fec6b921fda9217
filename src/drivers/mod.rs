// FlexSonic — Hardware Drivers

pub mod flex;
pub mod gyro;
pub mod serial;
