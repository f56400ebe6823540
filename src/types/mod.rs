pub mod coordinates;
pub mod observation;
pub mod status;
