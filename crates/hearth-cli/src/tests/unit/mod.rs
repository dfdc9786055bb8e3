mod options;
mod start;
mod stop_doctor;
