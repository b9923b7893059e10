fn main() {
    monday::run();
}
