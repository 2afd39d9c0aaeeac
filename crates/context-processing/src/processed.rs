use json_ld_core::Context;
use std::ops;

/// A processed context, together with the raw context it was built from.
pub struct Processed<'l> {
	unprocessed: &'l json_ld_syntax::context::Context,
	processed: Context,
}

impl<'l> Processed<'l> {
	pub fn new(unprocessed: &'l json_ld_syntax::context::Context, processed: Context) -> Self {
		Self {
			unprocessed,
			processed,
		}
	}

	pub fn unprocessed(&self) -> &'l json_ld_syntax::context::Context {
		self.unprocessed
	}

	pub fn into_processed(self) -> Context {
		self.processed
	}
}

impl ops::Deref for Processed<'_> {
	type Target = Context;

	fn deref(&self) -> &Self::Target {
		&self.processed
	}
}

impl ops::DerefMut for Processed<'_> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.processed
	}
}
