fn main() {
    dish_search_api::main();
}
