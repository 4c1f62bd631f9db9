pub mod billdb;
pub mod contractdb;
pub mod dashboarddb;
pub mod db;
pub mod roomdb;
pub mod seeddb;
pub mod servicedb;
pub mod userdb;

#[cfg(test)]
pub mod memory;
