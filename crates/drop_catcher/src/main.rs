fn main() {
    drop_catcher::run();
}
