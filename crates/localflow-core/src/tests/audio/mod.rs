mod capture;
mod resampler;
mod session;
mod wav;
