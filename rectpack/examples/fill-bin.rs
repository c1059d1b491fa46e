use rectpack::{Heuristic, Packer};

fn main() {
    env_logger::init();

    let sizes = [(128, 128), (64, 32), (32, 64), (200, 40), (16, 16), (128, 128)];

    for &heuristic in &[
        Heuristic::BestAreaFit,
        Heuristic::BestShortSideFit,
        Heuristic::BestLongSideFit,
    ] {
        let mut packer = Packer::new((256, 256)).heuristic(heuristic);

        println!("{:?}:", heuristic);

        for &size in &sizes {
            match packer.insert(size) {
                Some(rect) => println!("  {}x{} -> {:?}", size.0, size.1, rect.pos),
                None => println!("  {}x{} -> no room", size.0, size.1),
            }
        }

        println!("  {} free regions left", packer.free_regions().len());
    }
}
