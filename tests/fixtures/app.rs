use std::fmt;

fn helper() -> u32 {
    42
}

fn main() {
    let x = helper();
    if x > 10 {
        println!("big");
    }
}
