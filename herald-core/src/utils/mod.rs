mod parameters_utils;

pub use parameters_utils::ParametersUtils;
