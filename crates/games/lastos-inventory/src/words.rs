use rand::Rng;

/// Robotics and AI terms shown in the inventory.
pub const TERMS: [&str; 62] = [
    // AI/ML
    "Tensor", "Neural", "Gradient", "Epoch", "Sigmoid", "Perceptron", "Backprop", "Bias",
    "Variance", "Overfit", "Dropout", "Softmax", "Heuristic", "Agent", "Cluster", "Vector",
    "Embedding", "Token", "Transformer", "Attention", "Latency", "Inference", "Dataset",
    // Robotics/electronics
    "Actuator", "Servo", "Arduino", "Raspberry", "Micro", "Voltage", "Current", "Resistor",
    "Capacitor", "Inductor", "Diode", "Transistor", "MOSFET", "Relay", "Sensor", "Lidar",
    "Sonar", "Encoder", "Gyro", "Accel", "Magnet", "Solenoid", "Circuit", "PCB", "Schematic",
    "Firmware", "Signal", "Analog", "Digital", "PWM", "UART", "I2C", "SPI", "Serial", "Baud",
    "Kinematics", "Torque", "Payload", "DOF",
];

/// Pick a word not in `seen`, or any word once every term has been seen.
pub fn pick_new_word(rng: &mut impl Rng, seen: &[&'static str]) -> &'static str {
    let unseen: Vec<&'static str> = TERMS
        .iter()
        .copied()
        .filter(|w| !seen.contains(w))
        .collect();
    if unseen.is_empty() {
        TERMS[rng.random_range(0..TERMS.len())]
    } else {
        unseen[rng.random_range(0..unseen.len())]
    }
}
