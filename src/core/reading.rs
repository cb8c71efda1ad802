/// One water-quality snapshot, produced once per duty cycle.
///
/// All five fields are always present; there is no partial reading. The four
/// analog values are calibrated volts-derived quantities from the sensor
/// panel, temperature comes from the external probe source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub ph: f32,
    pub turbidity: f32,
    pub salinity: f32,
    pub ammonia: f32,
    pub temperature: f32,
}

impl Reading {
    pub fn new(ph: f32, turbidity: f32, salinity: f32, ammonia: f32, temperature: f32) -> Self {
        Reading {
            ph,
            turbidity,
            salinity,
            ammonia,
            temperature,
        }
    }
}
