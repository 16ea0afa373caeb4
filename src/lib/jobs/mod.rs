pub mod expire_confirm;
