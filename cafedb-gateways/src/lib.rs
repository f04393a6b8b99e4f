pub mod opencage;
