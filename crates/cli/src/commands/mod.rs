pub mod build;
pub mod dev;
pub mod doctor;
pub mod generate;
pub mod new;
pub mod test;
