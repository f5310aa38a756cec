pub struct DefaultsConfig {
    pub start: usize,
    pub stride: usize,
    pub profile_bin_width: f64,
    pub profile_axis: i64,
    pub field_bin_width: f64,
    pub field_axis: i64,
    pub selection: String,
    pub projection: i64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            start: 0,
            stride: 1,
            profile_bin_width: 0.5,
            profile_axis: 0,
            field_bin_width: 1.0,
            field_axis: 2,
            selection: "None".to_string(),
            projection: -1,
        }
    }
}
