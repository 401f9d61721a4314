macro_rules! print_cmd_error {
    ($tt:tt) => {
        println!("\x1b[1;31m[ERROR!!!] {}\x1b[0m", $tt);
    };
    ($tt:tt, $($tts:tt)+) => {
        println!("\x1b[1;31m[ERROR!!!] {}\x1b[0m", $tt);
        println!("\x1b[1;31m[ERROR!!!]\x1b[0m Start details...");
        println!("{}", core::format_args!($($tts)*));
        println!("\x1b[1;31m[ERROR!!!]\x1b[0m End details.\n");
    }
}

macro_rules! print_cmd_info {
    ($tt:tt, $($tts:tt)*) => {
        println!("\x1b[1;33m[INFO!!!] {}\x1b[0m", $tt);
        println!("{}", core::format_args!($($tts)*));
    }
}

pub(crate) use print_cmd_error;
pub(crate) use print_cmd_info;
