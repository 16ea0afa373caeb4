mod expire_confirm;
mod utils;
