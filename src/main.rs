use std::path::Path;

use ndarray_rand::rand::thread_rng;

use radar_toolkit::io::save_signal;
use radar_toolkit::{
    barker_code, cfar_detection, chirp, doppler_filter, matched_filter, range_doppler_map,
    CfarConfig, PulseTrain, Storable, Units,
};

fn main() {
    let mut rng = thread_rng();

    let reference = chirp(1.0e9, 100.0e6, 1.0e-6, 1.0e9);
    println!(
        "Chirp: {} samples, mean power {:.3}",
        reference.len(),
        reference.mean_power()
    );

    let barker = barker_code(13);
    println!("Barker-13: {} chips", barker.len());

    let mut received = reference.clone();
    received.add_noise(10.0.db(), &mut rng);
    received.add_clutter(3.0.db(), &mut rng);

    let filtered = matched_filter(&received, &reference);
    println!(
        "Matched filter: {} samples, peak magnitude {:.1}",
        filtered.len(),
        filtered.peak_magnitude()
    );

    let config = CfarConfig {
        nof_guard_cells: 4,
        nof_training_cells: 16,
        false_alarm_rate: 1.0e-4,
    };
    let detections = cfar_detection(&filtered, &config).expect("CFAR rejected its configuration");
    println!("CFAR detections at indices: {:?}", detections);

    // Doppler processing needs a power-of-two pulse length.
    let doppler_pulse = chirp(1.0e9, 100.0e6, 512.0e-9, 1.0e9);
    let doppler = doppler_filter(&doppler_pulse, 1.0e9, 1.0e9, 300.0)
        .expect("Doppler filter rejected the pulse");
    println!(
        "Doppler-filtered spectrum: mean power {:.3}",
        doppler.mean_power()
    );

    let mut train = PulseTrain::from_reference(&doppler_pulse, 64);
    train.add_noise(10.0.db(), &mut rng);
    train.add_clutter(3.0.db(), &mut rng);

    let map = range_doppler_map(&train).expect("Range-Doppler map rejected the train");
    println!("Range-Doppler map: {} x {}", map.nrows(), map.ncols());

    map.to_file(Path::new("range_doppler.json"))
        .expect("Could not write to file");
    save_signal(&filtered, Path::new("matched_output.csv")).expect("Could not write to file");
}
