/// Passages a run can draw from.
pub const PARAGRAPHS: [&str; 5] = [
    "The neural interface requires a precise calibration sequence before deployment. Each signal must pass through the cortex bridge at exactly the right frequency to avoid data corruption. Operators must maintain focus during the entire synchronization process, as even minor deviations can cause catastrophic feedback loops in the system.",
    "Quantum entanglement allows for instantaneous communication across vast distances, but it demands strict adherence to encoding protocols. The slightest error in qubit alignment can collapse the wavefunction, rendering the message irretrievable. Engineers have spent decades perfecting these systems to ensure reliable transmission.",
    "In the legacy systems of the Old World, binary code served as the foundation of all digital communication. Programmers wrote instructions line by line, carefully debugging each routine. Though primitive by modern standards, these early architectures laid the groundwork for the intelligent networks we rely on today.",
    "Firewall penetration testing involves a systematic analysis of network vulnerabilities. Security experts simulate attacks to identify weak points, then develop patches to reinforce the defenses. This ongoing cycle of testing and improvement is crucial in an era where cyber threats evolve rapidly.",
    "Machine learning models thrive on large datasets and iterative training cycles. Each epoch refines the model weights, gradually improving accuracy and reducing loss. The process requires substantial computational resources but yields powerful predictive capabilities when properly calibrated.",
];
