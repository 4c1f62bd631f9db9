pub mod billdtos;
pub mod contractdtos;
pub mod dashboarddtos;
pub mod roomdtos;
pub mod servicedtos;
pub mod userdtos;
