pub mod celestial_body;
