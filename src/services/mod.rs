pub mod i_wh_sender;
pub mod wh_sender;
