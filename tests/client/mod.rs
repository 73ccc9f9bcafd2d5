mod bundle;
mod http;
