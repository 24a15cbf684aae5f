pub mod jwt;
pub mod supabase_identity;

pub use supabase_identity::SupabaseIdentityProvider;
