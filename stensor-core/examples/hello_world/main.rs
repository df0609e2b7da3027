use stensor_core::Tensor;

fn main() {
    env_logger::init();

    let t = Tensor::<f32>::from_vec((0..12).map(|x| x as f32).collect(), [3, 4]).unwrap();
    print!("{t}");

    let tt = t.transpose(0, 1).unwrap();
    println!("transposed, contiguous: {}", tt.is_contiguous());
    print!("{tt}");

    let row = t.slice(1, 0).unwrap();
    row.set(&[0, 0], -4.0).unwrap();
    print!("after writing through a row view:\n{t}");

    print!("sum over rows:\n{}", t.sum_dim(0).unwrap());
    println!("total: {}", t.sum().unwrap());

    let noise = Tensor::<f64>::randn([2, 3]).unwrap();
    print!("{noise}");
}
