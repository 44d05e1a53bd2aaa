//! Parameter keys read by the `elmer-libnuma` family.

pub const CENTRE_LOCATION: &str = "CENTRE_LOCATION";
pub const SIMULATION_SCALING: &str = "SIMULATION_SCALING";
pub const SIMULATION_DOMAIN_RADIUS: &str = "SIMULATION_DOMAIN_RADIUS";

pub const NEEDLE_TIP_LOCATION: &str = "NEEDLE_TIP_LOCATION";
pub const NEEDLE_ENTRY_LOCATION: &str = "NEEDLE_ENTRY_LOCATION";
pub const CONSTANT_NEEDLE_EXTENSIONS: &str = "CONSTANT_NEEDLE_EXTENSIONS";

pub const SETTING_SOLID_NEEDLES: &str = "SETTING_SOLID_NEEDLES";
pub const SETTING_ZONE_BOUNDARIES: &str = "SETTING_ZONE_BOUNDARIES";
pub const SETTING_AXISYMMETRIC_INNER: &str = "SETTING_AXISYMMETRIC_INNER";
pub const SETTING_AXISYMMETRIC_INNER_COARSE: &str = "SETTING_AXISYMMETRIC_INNER_COARSE";

pub const RESOLUTION_HIGH: &str = "RESOLUTION_HIGH";
pub const RESOLUTION_FIELD_NEAR: &str = "RESOLUTION_FIELD_NEAR";
pub const RESOLUTION_FIELD_FAR: &str = "RESOLUTION_FIELD_FAR";
pub const RESOLUTION_FIELD_ZONE: &str = "RESOLUTION_FIELD_ZONE";
pub const RESOLUTION_FIELD_NEEDLE_ZONE: &str = "RESOLUTION_FIELD_NEEDLE_ZONE";

pub const ELMER_NUMA_MODULES: &str = "ELMER_NUMA_MODULES";

pub const SETTING_LESION_FIELD: &str = "SETTING_LESION_FIELD";
pub const SETTING_LESION_THRESHOLD_UPPER: &str = "SETTING_LESION_THRESHOLD_UPPER";
pub const SETTING_LESION_THRESHOLD_LOWER: &str = "SETTING_LESION_THRESHOLD_LOWER";
