use inout_ref::{inout, InOut};

fn swap_halves(mut values: InOut<'_, [i32]>) {
    let middle = values.len() / 2;
    let (front, back) = values.split_at_mut(middle);
    front.swap_with_slice(&mut back[..middle]);
}

fn fill_next(mut counter: InOut<'_, i32>, mut values: InOut<'_, [i32]>) {
    for value in values.iter_mut() {
        *counter += 1;
        *value = *counter;
    }
}

pub fn main() {
    let mut counter = 0;
    let mut values = [0; 6];

    fill_next(inout(&mut counter), InOut::upcast(inout(&mut values)));
    println!("Filled: {:?}, counter {}", values, counter);

    swap_halves(InOut::upcast(inout(&mut values)));
    println!("Swapped: {:?}", values);
}
