pub mod current;
pub mod daily_series;
pub mod projection;
pub mod work_intensity;
