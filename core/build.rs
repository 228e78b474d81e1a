fn main() {
    uniffi::generate_scaffolding("src/o2supply.udl").unwrap();
}
