pub mod anamnesis;
pub mod product;
