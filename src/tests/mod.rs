
mod integration;
