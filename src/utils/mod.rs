pub mod env_expand;
