mod logout;

pub(super) use logout::logout;
