pub mod cards;
pub mod home;
pub mod statusbar;
