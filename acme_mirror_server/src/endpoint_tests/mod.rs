mod helpers;
mod mocks;

mod external_mock;
mod misc;
mod orders;
mod runs;
mod webhooks;
