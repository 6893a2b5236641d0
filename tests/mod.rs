mod dynamic_tests;
